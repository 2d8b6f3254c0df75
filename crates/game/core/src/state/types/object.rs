//! Descriptive fields shared by rooms, artifacts and monsters.

/// Name, article, aliases and description of a game object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectInfo {
    pub name: String,
    /// "a", "an", "the", "some" or empty.
    pub article: String,
    pub aliases: Vec<String>,
    pub description: String,
    /// True once the player has been shown the full description.
    pub seen: bool,
}

impl ObjectInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Name prefixed with the article, when there is one.
    pub fn display_name(&self) -> String {
        if self.article.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.article, self.name)
        }
    }

    /// Case-insensitive match against the name, the article form, the
    /// plural form and every alias.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return false;
        }
        let name = self.name.to_lowercase();
        query == name
            || query == self.display_name().to_lowercase()
            || query == pluralize(&name)
            || self.aliases.iter().any(|alias| alias.to_lowercase() == query)
    }

    /// Loose match: the query is a prefix of the name or of an alias.
    pub fn matches_partially(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.len() < 3 {
            return false;
        }
        std::iter::once(&self.name)
            .chain(self.aliases.iter())
            .any(|candidate| {
                let candidate = candidate.to_lowercase();
                candidate.starts_with(&query)
                    || candidate.split_whitespace().any(|word| word.starts_with(&query))
            })
    }
}

/// English plural of a lowercase noun phrase (last word only).
pub fn pluralize(noun: &str) -> String {
    let consonant_y = noun.ends_with('y')
        && !noun
            .chars()
            .rev()
            .nth(1)
            .is_some_and(|c| "aeiou".contains(c));
    if consonant_y {
        format!("{}ies", &noun[..noun.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|end| noun.ends_with(end)) {
        format!("{noun}es")
    } else {
        format!("{noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_name_article_plural_and_alias() {
        let info = ObjectInfo {
            name: "Rusty Key".into(),
            article: "a".into(),
            aliases: vec!["key".into()],
            ..ObjectInfo::default()
        };
        assert!(info.matches("rusty key"));
        assert!(info.matches("A RUSTY KEY"));
        assert!(info.matches("rusty keys"));
        assert!(info.matches("key"));
        assert!(!info.matches("door"));
    }

    #[test]
    fn partial_match_needs_three_characters() {
        let info = ObjectInfo::named("lantern");
        assert!(info.matches_partially("lant"));
        assert!(!info.matches_partially("la"));
    }

    #[test]
    fn pluralizes_common_endings() {
        assert_eq!(pluralize("orc"), "orcs");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("fly"), "flies");
        assert_eq!(pluralize("key"), "keys");
    }
}
