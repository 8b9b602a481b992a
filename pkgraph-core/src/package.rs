use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Registries a dependency can be graphed from. Anything else is reported as
/// [`SpecifierError::UnsupportedType`] and left out of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Npm,
    Github,
}

impl PackageType {
    pub fn from_prefix(value: &str) -> Option<Self> {
        match value {
            "npm" => Some(PackageType::Npm),
            "github" => Some(PackageType::Github),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::Npm => "npm",
            PackageType::Github => "github",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecifierError {
    #[error("specifier {specifier:?} does not match `type:name@version`")]
    Malformed { specifier: String },

    #[error("specifier {specifier:?} has unsupported package type {kind:?}")]
    UnsupportedType { specifier: String, kind: String },
}

/// Structured form of a `type:name@version` specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    #[serde(rename = "type")]
    pub kind: PackageType,
    pub name: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub version: String,
    /// The raw specifier; key into the child dependency map.
    pub package: String,
    pub link: String,
    pub is_aliased: bool,
}

/// Parses `raw` into a descriptor.
///
/// `declared_key` is the name the importing package uses for the dependency.
/// When it differs from the resolved name the descriptor is marked as aliased
/// and displays the alias, while `full_name` and `link` keep pointing at the
/// resolved package.
pub fn normalize(
    raw: &str,
    declared_key: Option<&str>,
) -> std::result::Result<PackageDescriptor, SpecifierError> {
    let (kind, name, version) = split_specifier(raw).ok_or_else(|| SpecifierError::Malformed {
        specifier: raw.to_string(),
    })?;

    let kind = PackageType::from_prefix(kind).ok_or_else(|| SpecifierError::UnsupportedType {
        specifier: raw.to_string(),
        kind: kind.to_string(),
    })?;

    let full_name = name.to_string();

    let (owner, name, link) = match kind {
        PackageType::Github => {
            let link = format!("https://github.com/{}", full_name);
            match name.split_once('/') {
                Some((owner, repo)) => (Some(owner.to_string()), repo.to_string(), link),
                None => (None, name.to_string(), link),
            }
        }
        PackageType::Npm => (
            None,
            name.to_string(),
            format!("https://www.npmjs.com/package/{}", full_name),
        ),
    };

    let mut descriptor = PackageDescriptor {
        kind,
        name,
        full_name,
        owner,
        version: version.to_string(),
        package: raw.to_string(),
        link,
        is_aliased: false,
    };

    if let Some(key) = declared_key
        && key != descriptor.name
    {
        descriptor.name = key.to_string();
        descriptor.is_aliased = true;
    }

    Ok(descriptor)
}

/// Splits on the last `@` and then the last `:` before it.
fn split_specifier(raw: &str) -> Option<(&str, &str, &str)> {
    let (head, version) = raw.rsplit_once('@')?;
    let (kind, name) = head.rsplit_once(':')?;
    Some((kind, name, version))
}

/// Registry prefixes the graph understands. Used to filter declared and
/// top-level dependency maps before they reach the builder.
pub fn is_graphable_specifier(value: &str) -> bool {
    value.starts_with("npm:") || value.starts_with("github:")
}

/// Derives a node id from a raw specifier by replacing `. / : @ ^ >= > <= < ~ *`
/// with `-`. Operates on the whole specifier so different versions of one
/// package never collide.
pub fn sanitize_id(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '>' | '<' => {
                if chars.peek() == Some(&'=') {
                    chars.next();
                }
                out.push('-');
            }
            '.' | '/' | ':' | '@' | '^' | '~' | '*' => out.push('-'),
            other => out.push(other),
        }
    }

    out
}
