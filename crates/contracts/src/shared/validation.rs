//! Field checks shared by DTO `validate()` methods and by the forms.
//!
//! Every helper returns `Result<(), String>` with a message ready to be shown
//! next to the form, so callers can chain them with `?`.

pub fn required(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} es obligatorio", label));
    }
    Ok(())
}

pub fn max_len(value: &str, max: usize, label: &str) -> Result<(), String> {
    if value.trim().chars().count() > max {
        return Err(format!("{} no puede exceder {} caracteres", label, max));
    }
    Ok(())
}

pub fn non_negative(value: f64, label: &str) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{} no puede ser negativo", label));
    }
    Ok(())
}

pub fn positive(value: f64, label: &str) -> Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{} debe ser mayor a cero", label));
    }
    Ok(())
}

/// Reference to another record: must be set and positive.
pub fn reference(value: Option<i64>, label: &str) -> Result<(), String> {
    match value {
        Some(id) if id > 0 => Ok(()),
        _ => Err(format!("Seleccione {}", label)),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.contains(char::is_whitespace) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
}

fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// 10 digits once spaces, dashes, dots and parentheses are removed.
pub fn is_valid_phone(phone: &str) -> bool {
    let allowed = |c: char| c.is_ascii_digit() || " -().".contains(c);
    phone.chars().all(allowed) && digits_only(phone).len() == 10
}

/// Mexican postal code: exactly five digits.
pub fn is_valid_zip_code(zip: &str) -> bool {
    let zip = zip.trim();
    zip.len() == 5 && zip.chars().all(|c| c.is_ascii_digit())
}

/// Mexican RFC: 4 letters (persona física) or 3 letters (persona moral),
/// a YYMMDD date and a 3-character homoclave.
pub fn is_valid_rfc(rfc: &str) -> bool {
    let rfc: Vec<char> = rfc.trim().to_uppercase().chars().collect();
    let prefix_len = match rfc.len() {
        13 => 4,
        12 => 3,
        _ => return false,
    };

    let is_rfc_letter = |c: &char| c.is_ascii_uppercase() || *c == '&' || *c == 'Ñ';
    if !rfc[..prefix_len].iter().all(is_rfc_letter) {
        return false;
    }

    let date = &rfc[prefix_len..prefix_len + 6];
    if !date.iter().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let two = |i: usize| {
        date[i].to_digit(10).unwrap_or(0) * 10 + date[i + 1].to_digit(10).unwrap_or(0)
    };
    let (month, day) = (two(2), two(4));
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return false;
    }

    rfc[prefix_len + 6..].iter().all(|c| c.is_ascii_alphanumeric())
}

pub fn optional_email(value: Option<&str>, label: &str) -> Result<(), String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() && !is_valid_email(v) => {
            Err(format!("{} no tiene un formato válido", label))
        }
        _ => Ok(()),
    }
}

pub fn optional_phone(value: Option<&str>, label: &str) -> Result<(), String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() && !is_valid_phone(v) => {
            Err(format!("{} debe contener 10 dígitos", label))
        }
        _ => Ok(()),
    }
}

pub fn optional_zip_code(value: Option<&str>, label: &str) -> Result<(), String> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() && !is_valid_zip_code(v) => {
            Err(format!("{} debe contener 5 dígitos", label))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails() {
        assert!(is_valid_email("ventas@empresa.com.mx"));
        assert!(is_valid_email("  a.b@c.io "));
        assert!(!is_valid_email("sin-arroba.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@c.com"));
    }

    #[test]
    fn phones() {
        assert!(is_valid_phone("5512345678"));
        assert!(is_valid_phone("(55) 1234-5678"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("55123456xx"));
    }

    #[test]
    fn zip_codes() {
        assert!(is_valid_zip_code("06600"));
        assert!(!is_valid_zip_code("6600"));
        assert!(!is_valid_zip_code("0660A"));
    }

    #[test]
    fn rfc_layouts() {
        assert!(is_valid_rfc("GODE561231GR8"));
        assert!(is_valid_rfc("abc010203xy9"));
        assert!(is_valid_rfc("Ñ&A010203AB1"));
        assert!(!is_valid_rfc("GODE561331GR8"));
        assert!(!is_valid_rfc("GODE560031GR8"));
        assert!(!is_valid_rfc("GOD1561231GR8"));
        assert!(!is_valid_rfc("GODE5612"));
    }

    #[test]
    fn required_and_lengths() {
        assert!(required("  ", "Nombre").is_err());
        assert!(required("x", "Nombre").is_ok());
        assert!(max_len("abcd", 3, "Nombre").is_err());
        assert!(max_len("ñññ", 3, "Nombre").is_ok());
    }

    #[test]
    fn numbers_and_references() {
        assert!(non_negative(0.0, "Precio").is_ok());
        assert!(non_negative(-0.01, "Precio").is_err());
        assert!(non_negative(f64::NAN, "Precio").is_err());
        assert!(positive(0.0, "Cantidad").is_err());
        assert!(reference(None, "un cliente").is_err());
        assert!(reference(Some(0), "un cliente").is_err());
        assert!(reference(Some(3), "un cliente").is_ok());
    }

    #[test]
    fn optional_fields_accept_empty() {
        assert!(optional_email(None, "Correo").is_ok());
        assert!(optional_email(Some(""), "Correo").is_ok());
        assert!(optional_email(Some("x"), "Correo").is_err());
        assert!(optional_phone(Some(" "), "Teléfono").is_ok());
        assert!(optional_zip_code(Some("123"), "C.P.").is_err());
    }
}
