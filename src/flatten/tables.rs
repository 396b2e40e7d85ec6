//! Per-table field mappings

/// How a source value is converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Total string coercion
    Text,
    /// Numeric coercion, 0.0 when absent
    Float,
    /// Booleans kept, null when absent
    Bool,
}

/// One output column and where it comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Output column name
    pub column: &'static str,
    /// Key in the upstream record
    pub source: &'static str,
    /// Conversion applied
    pub kind: FieldKind,
}

const fn text(column: &'static str, source: &'static str) -> FieldSpec {
    FieldSpec {
        column,
        source,
        kind: FieldKind::Text,
    }
}

const fn float(column: &'static str, source: &'static str) -> FieldSpec {
    FieldSpec {
        column,
        source,
        kind: FieldKind::Float,
    }
}

const fn boolean(column: &'static str, source: &'static str) -> FieldSpec {
    FieldSpec {
        column,
        source,
        kind: FieldKind::Bool,
    }
}

const CUSTOMERS: &[FieldSpec] = &[
    text("name", "name"),
    text("email", "email"),
    text("phone_primary", "phonePrimary"),
    text("status", "status"),
    boolean("is_active", "isActive"),
];

const INVOICES: &[FieldSpec] = &[
    text("invoice_number", "invoiceNumber"),
    float("total_amount", "totalAmount"),
    text("status", "status"),
    text("customer_name", "customerName"),
];

const VENDORS: &[FieldSpec] = &[
    text("name", "name"),
    text("email", "email"),
    text("status", "status"),
];

/// Field mapping for a table; empty for unknown tables
pub fn fields_for(table: &str) -> &'static [FieldSpec] {
    match table {
        "customers" => CUSTOMERS,
        "invoices" => INVOICES,
        "vendors" => VENDORS,
        _ => &[],
    }
}
