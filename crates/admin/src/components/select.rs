//! `<select>` options rendered by the form templates.

/// One `<option>` of a select input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

/// Options for `items`, marking the one whose value equals `current`.
pub fn options<I, V, L>(items: I, current: &str) -> Vec<SelectOption>
where
    I: IntoIterator<Item = (V, L)>,
    V: Into<String>,
    L: Into<String>,
{
    items
        .into_iter()
        .map(|(value, label)| {
            let value = value.into();
            let selected = value == current;
            SelectOption::new(value, label, selected)
        })
        .collect()
}
