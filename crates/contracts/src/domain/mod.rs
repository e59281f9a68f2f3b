// HR / payroll catalogs
pub mod a001_area;
pub mod a002_hierarchical_level;
pub mod a003_contract_type;
pub mod a004_work_shift;
pub mod a005_labor_risk;
pub mod a006_shift;
pub mod a007_payment_period;
pub mod a008_payment_unit;
pub mod a009_job_position;

// Customers
pub mod a010_customer;
pub mod a011_customer_delivery_address;
pub mod a012_customer_fiscal_data;
pub mod a013_customer_product;

// Sales pipeline
pub mod a014_quotation;
pub mod a015_order;
pub mod a016_sale;
pub mod a017_payment;

// Inventory
pub mod a018_product;

pub mod common;
