//! Prefixes: `-name=a,b,c` expands to `-<ersatz>a -<ersatz>b -<ersatz>c`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefix {
    pub name: String,
    pub ersatz: String,
    pub description: String,
}

impl Prefix {
    pub fn new(name: &str, ersatz: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            ersatz: ersatz.to_string(),
            description: description.to_string(),
        }
    }

    /// Option names produced by the right-hand side of `name=rhs`, in order.
    ///
    /// Blank suffixes (`-t=a,,b`) are dropped.
    pub fn expand(&self, rhs: &str) -> Vec<String> {
        rhs.split(',')
            .map(str::trim)
            .filter(|suffix| !suffix.is_empty())
            .map(|suffix| format!("{}{}", self.ersatz, suffix))
            .collect()
    }

    /// The part of `name` after the ersatz, if `name` starts with it.
    pub fn suffix_of<'a>(&self, name: &'a str) -> Option<&'a str> {
        name.strip_prefix(self.ersatz.as_str())
            .filter(|suffix| !suffix.is_empty())
    }
}
