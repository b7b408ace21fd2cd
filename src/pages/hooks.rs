//! Typed page hooks: the inputs and outputs a controller is wired to.

/// Free-text query box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    id: String,
    value: String,
}

impl TextInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

/// Category selector. The leading "All" option (empty value) is implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    id: String,
    options: Vec<String>,
    value: String,
}

impl Select {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            options: Vec::new(),
            value: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the options. A current value that is no longer offered
    /// falls back to "All".
    pub fn set_options(&mut self, values: impl IntoIterator<Item = String>) {
        self.options = values.into_iter().collect();
        if !self.options.iter().any(|o| *o == self.value) {
            self.value.clear();
        }
    }

    /// Select a value. Unknown values fall back to "All", like a browser
    /// `<select>`; returns whether the requested value was selected.
    pub fn set_value(&mut self, value: &str) -> bool {
        if value.is_empty() || self.options.iter().any(|o| o == value) {
            self.value = value.to_string();
            true
        } else {
            self.value.clear();
            false
        }
    }
}

/// Strip of quick-filter buttons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipStrip {
    id: String,
    chips: Vec<String>,
}

impl ChipStrip {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            chips: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn chips(&self) -> &[String] {
        &self.chips
    }

    /// Replace the chips with the first `limit` values
    pub fn set(&mut self, values: &[String], limit: usize) {
        self.chips = values.iter().take(limit).cloned().collect();
    }
}

/// One line of status text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    id: String,
    text: String,
}

impl StatusLine {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}
