use getset::Getters;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of a parsed OFX document: one tag, the text that follows it, and
/// the tags nested inside it.
///
/// Names are stored in upper case, and every lookup by name is
/// case-insensitive.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Element {
    /// Returns the upper-cased tag name.
    #[getset(get = "pub")]
    pub(crate) name: String,

    /// Returns the text content, or an empty string.
    #[getset(get = "pub")]
    pub(crate) content: String,

    /// Returns the nested elements in document order.
    #[getset(get = "pub")]
    pub(crate) children: Vec<Element>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Element {
            name: name.to_uppercase(),
            content: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_content(mut self, text: &str) -> Self {
        self.push_content(text);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.chars().eq(name.chars().flat_map(char::to_uppercase))
    }

    /// Appends `text`, separated from existing content by a single space.
    pub(crate) fn push_content(&mut self, text: &str) {
        if !self.content.is_empty() {
            self.content.push(' ');
        }
        self.content.push_str(text);
    }

    /// Returns the first child named `name`.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.is_named(name))
    }

    /// Iterates over all children named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |child| child.is_named(name))
    }

    /// Follows `tags` down the tree, taking the first matching child at each
    /// step. An empty path returns `self`.
    ///
    /// ```
    /// use ofx::parse::parse_str;
    ///
    /// let root = parse_str("<OFX><SONRS><DTSERVER>20170318</SONRS></OFX>").unwrap();
    /// let date = root.path(&["sonrs", "dtserver"]).unwrap();
    /// assert_eq!(date.content(), "20170318");
    /// ```
    pub fn path<S: AsRef<str>>(&self, tags: &[S]) -> Option<&Element> {
        tags.iter()
            .try_fold(self, |element, tag| element.child(tag.as_ref()))
    }

    /// Content of the element at `tags`, see [`Element::path`].
    pub fn content_at<S: AsRef<str>>(&self, tags: &[S]) -> Option<&str> {
        self.path(tags).map(|element| element.content.as_str())
    }
}

/// Writes the element back in tag syntax, closing every tag explicitly.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>\n{}", self.name, self.content)?;
        for (index, child) in self.children.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", child)?;
        }
        write!(f, "\n</{}>", self.name)
    }
}
