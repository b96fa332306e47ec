use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Terminal table with rounded borders
pub fn to_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}
