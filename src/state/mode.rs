/// How taps on the listing are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Taps open directories and pick single files.
    #[default]
    Single,
    /// Action mode: taps toggle membership in the selection.
    Multi,
}

impl SelectionMode {
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi)
    }
}
