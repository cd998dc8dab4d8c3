use std::borrow::Cow;

/// Characters that can break node-link diagram or DOT markup, mapped to
/// full-width lookalikes. No substitute is itself in the unsafe set.
const DIAGRAM_SAFE_SUBSTITUTIONS: &[(char, char)] = &[
    ('\\', '＼'),
    ('{', '｛'),
    ('}', '｝'),
    ('[', '［'),
    (']', '］'),
    ('<', '＜'),
    ('>', '＞'),
    ('#', '＃'),
    ('|', '｜'),
    ('~', '～'),
    ('"', '＂'),
    ('`', '｀'),
];

/// A label rewriting profile, selected per exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelProfile {
    name: &'static str,
    substitutions: &'static [(char, char)],
}

impl LabelProfile {
    pub const IDENTITY: LabelProfile = LabelProfile {
        name: "identity",
        substitutions: &[],
    };

    pub const DIAGRAM_SAFE: LabelProfile = LabelProfile {
        name: "diagram_safe",
        substitutions: DIAGRAM_SAFE_SUBSTITUTIONS,
    };

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply<'a>(&self, label: &'a str) -> Cow<'a, str> {
        if !label.chars().any(|character| self.substitute(character).is_some()) {
            return Cow::Borrowed(label);
        }

        Cow::Owned(
            label
                .chars()
                .map(|character| self.substitute(character).unwrap_or(character))
                .collect(),
        )
    }

    fn substitute(&self, character: char) -> Option<char> {
        self.substitutions
            .iter()
            .find(|(unsafe_char, _)| *unsafe_char == character)
            .map(|(_, replacement)| *replacement)
    }
}
