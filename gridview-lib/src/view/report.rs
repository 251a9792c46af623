//! Per-entity field mappings for the reporting variant.
//!
//! The reporting screens select which fields carry a row's date and
//! category by page kind. This is a deliberate hand-maintained table, not
//! inference: each entity names its own fields explicitly.

/// Field names the structured filter resolves against for one entity.
///
/// # Example
///
/// ```
/// use gridview_lib::view::ReportFields;
///
/// let fields = ReportFields::for_page("purchase").unwrap();
/// assert_eq!(fields.date_field, "invoiceDate");
/// assert_eq!(fields.category_field, "supplierId");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFields {
    /// Dotted path of the field carrying the row's date.
    pub date_field: String,
    /// Dotted path of the field carrying the row's category key.
    pub category_field: String,
}

impl ReportFields {
    /// Creates a mapping with explicit field names.
    pub fn new(date_field: impl Into<String>, category_field: impl Into<String>) -> Self {
        Self {
            date_field: date_field.into(),
            category_field: category_field.into(),
        }
    }

    /// Looks up the built-in mapping for a page discriminator.
    ///
    /// Unknown pages return `None`; callers with bespoke screens construct
    /// the mapping with [`ReportFields::new`] instead.
    pub fn for_page(page: &str) -> Option<Self> {
        let (date_field, category_field) = match page {
            "purchase" => ("invoiceDate", "supplierId"),
            "sale" => ("invoiceDate", "customerId"),
            "expense" => ("expenseDate", "categoryId"),
            "shipment" => ("shipmentDate", "supplierId"),
            "ledger" => ("entryDate", "accountId"),
            _ => return None,
        };
        Some(Self::new(date_field, category_field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_pages() {
        assert_eq!(
            ReportFields::for_page("purchase"),
            Some(ReportFields::new("invoiceDate", "supplierId"))
        );
        assert_eq!(
            ReportFields::for_page("ledger"),
            Some(ReportFields::new("entryDate", "accountId"))
        );
        assert_eq!(ReportFields::for_page("unknown"), None);
    }
}
