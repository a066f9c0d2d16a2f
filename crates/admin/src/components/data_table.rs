//! Data table component types.
//!
//! These types define the configuration for the list tables in the dashboard.
//! Which columns a table shows can depend on the viewer's [`Role`].

use affiliate_crm_core::{AgentStatus, CustomerStatus, Role};

use super::select::SelectOption;

/// Column definition for a data table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: &'static str,
    /// Display label for the column header.
    pub label: &'static str,
}

impl TableColumn {
    #[must_use]
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self { key, label }
    }
}

/// Filter type for data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    /// Text input filter.
    Text,
    /// Single-select dropdown.
    Select,
}

/// Option for select filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Option value.
    pub value: &'static str,
    /// Display label.
    pub label: &'static str,
}

impl FilterOption {
    #[must_use]
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// Filter definition for a data table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFilter {
    /// Query parameter key.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Filter type.
    pub filter_type: FilterType,
    /// Placeholder text (for text inputs).
    pub placeholder: Option<&'static str>,
    /// Available options (for selects).
    pub options: Vec<FilterOption>,
}

impl TableFilter {
    /// Create a text filter.
    #[must_use]
    pub const fn text(key: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            key,
            label,
            filter_type: FilterType::Text,
            placeholder: Some(placeholder),
            options: vec![],
        }
    }

    /// Create a select filter.
    #[must_use]
    pub fn select(key: &'static str, label: &'static str, options: Vec<FilterOption>) -> Self {
        Self {
            key,
            label,
            filter_type: FilterType::Select,
            placeholder: None,
            options,
        }
    }

    /// Whether this filter renders as a text input.
    #[must_use]
    pub fn is_text(&self) -> bool {
        self.filter_type == FilterType::Text
    }

    /// Status select with an `all` option followed by every status.
    fn status(statuses: impl IntoIterator<Item = (&'static str, &'static str)>) -> Self {
        let options = std::iter::once(FilterOption::new("all", "All statuses"))
            .chain(statuses.into_iter().map(|(value, label)| FilterOption::new(value, label)))
            .collect();
        Self::select("status", "Status", options)
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: &'static str,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Filter definitions.
    pub filters: Vec<TableFilter>,
    /// Title for empty state.
    pub empty_title: &'static str,
    /// Description for empty state.
    pub empty_description: Option<&'static str>,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub const fn new(table_id: &'static str) -> Self {
        Self {
            table_id,
            columns: vec![],
            filters: vec![],
            empty_title: "No items found",
            empty_description: None,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, title: &'static str, description: Option<&'static str>) -> Self {
        self.empty_title = title;
        self.empty_description = description;
        self
    }

    /// Whether the table has a column with this key.
    #[must_use]
    pub fn has_column(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c.key == key)
    }

    /// Column keys, in display order.
    #[must_use]
    pub fn column_keys(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.key).collect()
    }

    /// Options of the select filter `key`, with `current` selected
    /// (`all` when absent).
    #[must_use]
    pub fn select_options(&self, key: &str, current: Option<&str>) -> Vec<SelectOption> {
        let current = current.unwrap_or("all");
        self.filters
            .iter()
            .filter(|f| f.key == key && !f.is_text())
            .flat_map(|f| f.options.iter())
            .map(|o| SelectOption::new(o.value, o.label, o.value == current))
            .collect()
    }
}

/// Build the agents table configuration.
#[must_use]
pub fn agents_table_config() -> DataTableConfig {
    DataTableConfig::new("agents")
        .column(TableColumn::new("name", "Agent"))
        .column(TableColumn::new("phone", "Phone"))
        .column(TableColumn::new("assigned_customers", "Customers"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("created", "Joined"))
        .column(TableColumn::new("actions", "Actions"))
        .filter(TableFilter::text("q", "Search", "Search agents by name or email..."))
        .filter(TableFilter::status(
            AgentStatus::ALL.iter().map(|s| (s.as_str(), s.label())),
        ))
        .empty_state("No agents found", Some("Try adjusting your search or filters"))
}

/// Build the customers table configuration for a viewer's role.
///
/// Admins see who each customer is assigned to; agents get an order action
/// instead.
#[must_use]
pub fn customers_table_config(role: Role) -> DataTableConfig {
    let config = DataTableConfig::new("customers")
        .column(TableColumn::new("name", "Customer"))
        .column(TableColumn::new("phone", "Phone"));

    let config = match role {
        Role::Admin => config
            .column(TableColumn::new("assigned_agent", "Assigned Agent"))
            .column(TableColumn::new("status", "Status")),
        Role::Agent => config
            .column(TableColumn::new("status", "Status"))
            .column(TableColumn::new("actions", "Actions")),
    };

    let empty_description = match role {
        Role::Admin => "Try adjusting your search or filters",
        Role::Agent => "No customers are assigned to you yet",
    };

    config
        .filter(TableFilter::text("q", "Search", "Search by name or phone..."))
        .filter(TableFilter::status(
            CustomerStatus::ALL.iter().map(|s| (s.as_str(), s.label())),
        ))
        .empty_state("No customers found", Some(empty_description))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_columns_by_role() {
        assert_eq!(
            customers_table_config(Role::Admin).column_keys(),
            ["name", "phone", "assigned_agent", "status"]
        );
        assert_eq!(
            customers_table_config(Role::Agent).column_keys(),
            ["name", "phone", "status", "actions"]
        );

        let labels: Vec<_> = customers_table_config(Role::Agent)
            .columns
            .iter()
            .map(|c| c.label)
            .collect();
        assert_eq!(labels, ["Customer", "Phone", "Status", "Actions"]);
    }

    #[test]
    fn test_status_filter_options() {
        let config = agents_table_config();
        let status = config.filters.iter().find(|f| f.key == "status");
        let values: Vec<_> = status
            .map(|f| f.options.iter().map(|o| o.value).collect())
            .unwrap_or_default();
        assert_eq!(values, ["all", "active", "inactive"]);
        assert!(config.filters.iter().any(TableFilter::is_text));
    }

    #[test]
    fn test_select_options_mark_current() {
        let config = customers_table_config(Role::Admin);

        let selected: Vec<_> = config
            .select_options("status", Some("pending"))
            .into_iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        assert_eq!(selected, ["pending"]);

        let defaulted = config.select_options("status", None);
        assert!(defaulted[0].selected);
        assert!(config.select_options("q", None).is_empty());
    }
}
