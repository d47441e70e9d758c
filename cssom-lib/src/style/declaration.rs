use std::fmt;

/// One CSS property/value pair, e.g. "color" => "red".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
    pub important: bool,
}

impl Declaration {
    fn write_css(&self, out: &mut String) {
        out.push_str(&self.name);
        out.push(':');
        out.push_str(&self.value);
        if self.important {
            out.push_str(" !important");
        }
        out.push(';');
    }
}

/// An ordered property => value mapping belonging to one rule.
///
/// Property names are normalized to ASCII lowercase. Insertion order is
/// preserved: updating an existing property keeps its position, and
/// `css_text` renders properties in stored order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclaration {
    declarations: Vec<Declaration>,
}

impl StyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_declarations(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.iter()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.declarations
            .iter()
            .position(|decl| decl.name.eq_ignore_ascii_case(name))
    }

    /// Returns the value of the named property, or an empty string if unset.
    pub fn get_property_value(&self, name: &str) -> String {
        match self.position(name) {
            Some(idx) => self.declarations[idx].value.clone(),
            None => String::new(),
        }
    }

    /// Returns `"important"` if the named property carries `!important`,
    /// otherwise an empty string.
    pub fn get_property_priority(&self, name: &str) -> &'static str {
        match self.position(name) {
            Some(idx) if self.declarations[idx].important => "important",
            _ => "",
        }
    }

    /// Sets a property without priority. An existing property keeps its
    /// position in the declaration list.
    pub fn set_property(&mut self, name: &str, value: &str) {
        self.set_property_with_priority(name, value, false);
    }

    pub fn set_property_with_priority(&mut self, name: &str, value: &str, important: bool) {
        let name = name.to_ascii_lowercase();
        match self.position(&name) {
            Some(idx) => {
                self.declarations[idx].value = value.to_owned();
                self.declarations[idx].important = important;
            }
            None => self.declarations.push(Declaration {
                name,
                value: value.to_owned(),
                important,
            }),
        }
    }

    /// Removes the named property, returning its previous value (empty string
    /// if it was not set).
    pub fn remove_property(&mut self, name: &str) -> String {
        match self.position(name) {
            Some(idx) => self.declarations.remove(idx).value,
            None => String::new(),
        }
    }

    /// Renders the full declaration list as `name:value;` segments joined by
    /// single spaces.
    pub fn css_text(&self) -> String {
        self.render(&[])
    }

    /// Renders the declaration list with the named properties left out. The
    /// serializer uses this to suppress bookkeeping properties without
    /// touching the stored declarations.
    pub(crate) fn render(&self, hidden: &[&str]) -> String {
        let mut out = String::new();
        for decl in &self.declarations {
            if hidden.iter().any(|name| decl.name.eq_ignore_ascii_case(name)) {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            decl.write_css(&mut out);
        }
        out
    }
}

impl fmt::Display for StyleDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_text())
    }
}
