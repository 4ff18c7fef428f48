use oxrdf::{IriParseError, NamedNode, NamedNodeRef};
use sources::Record;

pub const DEFAULT_NAMESPACE: &str = "http://example.org/";

/// Concatenate namespace and id.
///
/// Ids that already form a valid IRI are used verbatim. Otherwise characters
/// IRIs forbid (space, `<>"{}|\^`, backtick, controls) are percent-encoded,
/// and if that is still not enough the whole id is.
pub fn entity_uri(namespace: &str, id: &str) -> String {
    let uri = format!("{}{}", namespace, id);
    if NamedNode::new(uri.as_str()).is_ok() {
        return uri;
    }

    let escaped: String = id
        .chars()
        .map(|c| {
            if is_iri_forbidden(c) {
                urlencoding::encode(c.encode_utf8(&mut [0; 4])).into_owned()
            } else {
                c.to_string()
            }
        })
        .collect();
    let uri = format!("{}{}", namespace, escaped);
    if NamedNode::new(uri.as_str()).is_ok() {
        return uri;
    }

    format!("{}{}", namespace, urlencoding::encode(id))
}

fn is_iri_forbidden(c: char) -> bool {
    c.is_control() || matches!(c, ' ' | '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`')
}

/// Namespace plus the class and predicates the graph uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    namespace: String,
    drug: NamedNode,
    treats: NamedNode,
    affects: NamedNode,
}

impl Vocabulary {
    pub fn new(namespace: impl Into<String>) -> Result<Self, IriParseError> {
        let namespace = namespace.into();
        NamedNode::new(namespace.as_str())?;

        Ok(Self {
            drug: NamedNode::new(format!("{}Drug", namespace))?,
            treats: NamedNode::new(format!("{}treats", namespace))?,
            affects: NamedNode::new(format!("{}affects", namespace))?,
            namespace,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn drug(&self) -> NamedNodeRef<'_> {
        self.drug.as_ref()
    }

    pub fn treats(&self) -> NamedNodeRef<'_> {
        self.treats.as_ref()
    }

    pub fn affects(&self) -> NamedNodeRef<'_> {
        self.affects.as_ref()
    }

    /// URI of the entity a record stands for.
    pub fn entity(&self, record: &Record) -> NamedNode {
        // entity_uri returns either a parser-checked IRI or the checked
        // namespace followed by unreserved and %XX characters only.
        NamedNode::new_unchecked(entity_uri(&self.namespace, &record.id()))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            drug: NamedNode::new_unchecked(format!("{}Drug", DEFAULT_NAMESPACE)),
            treats: NamedNode::new_unchecked(format!("{}treats", DEFAULT_NAMESPACE)),
            affects: NamedNode::new_unchecked(format!("{}affects", DEFAULT_NAMESPACE)),
        }
    }
}
