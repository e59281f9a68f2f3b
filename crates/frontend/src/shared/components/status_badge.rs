use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ActiveBadge(active: bool) -> impl IntoView {
    let (color, label) = if active {
        (BadgeColor::Success, "Activo")
    } else {
        (BadgeColor::Subtle, "Inactivo")
    };
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>
            {label}
        </Badge>
    }
}

/// Document status pill; the color is chosen by the caller's status enum.
#[component]
pub fn StatusBadge(label: &'static str, color: BadgeColor) -> impl IntoView {
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>
            {label}
        </Badge>
    }
}
