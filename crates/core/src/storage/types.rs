/// Which rows a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Only rows with `is_active = true` (public site).
    #[default]
    Active,
    /// Every row (admin console).
    All,
}

impl Visibility {
    /// Returns true if a row with the given active flag is visible.
    pub fn includes(self, is_active: bool) -> bool {
        match self {
            Visibility::Active => is_active,
            Visibility::All => true,
        }
    }
}
