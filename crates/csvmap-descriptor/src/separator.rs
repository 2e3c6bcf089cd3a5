/// Default CSV column separator
pub const DEFAULT_SEPARATOR: char = ',';

/// Symbolic separator names accepted in the `separator` attribute
pub const SEPARATORS: &[(&str, char)] = &[
    ("tab", '\t'),
    ("space", ' '),
    ("comma", ','),
    ("dot", '.'),
    ("colon", ':'),
    ("semicolon", ';'),
];

/// Resolve a symbolic separator name; unlisted names resolve to `None`
pub fn separator_for(name: &str) -> Option<char> {
    SEPARATORS
        .iter()
        .find(|(symbol, _)| *symbol == name)
        .map(|(_, c)| *c)
}
