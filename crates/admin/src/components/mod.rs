//! Reusable view components.

pub mod data_table;
pub mod select;

pub use data_table::{
    DataTableConfig, FilterOption, FilterType, TableColumn, TableFilter, agents_table_config,
    customers_table_config,
};
pub use select::{SelectOption, options};
