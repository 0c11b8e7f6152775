use serde::{Deserialize, Serialize};

/// Seeded expense categories. These can never be removed.
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 7] = [
    "Alimentação",
    "Transporte",
    "Moradia",
    "Lazer",
    "Saúde",
    "Educação",
    "Outros",
];

/// Seeded income categories. These can never be removed.
pub const DEFAULT_INCOME_CATEGORIES: [&str; 5] = [
    "Salário",
    "Investimentos",
    "Freelance",
    "Presente",
    "Outras Receitas",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Expense,
    Income,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Expense => "expense",
            CategoryKind::Income => "income",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "expense" => Some(CategoryKind::Expense),
            "income" => Some(CategoryKind::Income),
            _ => None,
        }
    }

    pub fn defaults(&self) -> &'static [&'static str] {
        match self {
            CategoryKind::Expense => &DEFAULT_EXPENSE_CATEGORIES,
            CategoryKind::Income => &DEFAULT_INCOME_CATEGORIES,
        }
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two ordered category lists: the seeded defaults first, custom entries
/// appended after them. Serializes to `{"expense": [...], "income": [...]}`,
/// the categories slot format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySet {
    pub expense: Vec<String>,
    pub income: Vec<String>,
}

impl Default for CategorySet {
    fn default() -> Self {
        Self {
            expense: DEFAULT_EXPENSE_CATEGORIES.map(String::from).to_vec(),
            income: DEFAULT_INCOME_CATEGORIES.map(String::from).to_vec(),
        }
    }
}

impl CategorySet {
    pub fn list(&self, kind: CategoryKind) -> &[String] {
        match kind {
            CategoryKind::Expense => &self.expense,
            CategoryKind::Income => &self.income,
        }
    }

    fn list_mut(&mut self, kind: CategoryKind) -> &mut Vec<String> {
        match kind {
            CategoryKind::Expense => &mut self.expense,
            CategoryKind::Income => &mut self.income,
        }
    }

    /// Whether `name` is one of the seeded defaults for `kind`.
    pub fn is_default(name: &str, kind: CategoryKind) -> bool {
        kind.defaults().contains(&name)
    }

    /// Append a custom category. The name is trimmed; empty names and exact
    /// duplicates (case-sensitive) are rejected.
    pub fn add(&mut self, name: &str, kind: CategoryKind) -> Result<(), CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        let list = self.list_mut(kind);
        if list.iter().any(|c| c == name) {
            return Err(CategoryError::AlreadyExists(name.to_string()));
        }
        list.push(name.to_string());
        Ok(())
    }

    /// Remove a custom category. Seeded defaults are protected.
    pub fn remove(&mut self, name: &str, kind: CategoryKind) -> Result<(), CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CategoryError::EmptyName);
        }
        if Self::is_default(name, kind) {
            return Err(CategoryError::DefaultProtected(name.to_string()));
        }
        let list = self.list_mut(kind);
        match list.iter().position(|c| c == name) {
            Some(index) => {
                list.remove(index);
                Ok(())
            }
            None => Err(CategoryError::NotFound(name.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    EmptyName,
    AlreadyExists(String),
    DefaultProtected(String),
    NotFound(String),
}

impl std::fmt::Display for CategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryError::EmptyName => write!(f, "Category name cannot be empty"),
            CategoryError::AlreadyExists(name) => {
                write!(f, "Category already exists: {}", name)
            }
            CategoryError::DefaultProtected(name) => {
                write!(f, "Cannot remove default category: {}", name)
            }
            CategoryError::NotFound(name) => write!(f, "Category not found: {}", name),
        }
    }
}

impl std::error::Error for CategoryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_seeded() {
        let set = CategorySet::default();
        assert_eq!(set.expense.len(), DEFAULT_EXPENSE_CATEGORIES.len());
        assert_eq!(set.income.len(), DEFAULT_INCOME_CATEGORIES.len());
        assert_eq!(set.expense[0], "Alimentação");
        assert_eq!(set.income[0], "Salário");
    }

    #[test]
    fn test_add_trims_and_appends() {
        let mut set = CategorySet::default();
        set.add("  Assinaturas  ", CategoryKind::Expense).unwrap();
        assert_eq!(set.expense.last().unwrap(), "Assinaturas");
    }

    #[test]
    fn test_add_rejects_empty_and_duplicate() {
        let mut set = CategorySet::default();
        assert_eq!(set.add("   ", CategoryKind::Expense), Err(CategoryError::EmptyName));
        assert_eq!(
            set.add("Transporte", CategoryKind::Expense),
            Err(CategoryError::AlreadyExists("Transporte".into()))
        );
    }

    #[test]
    fn test_remove_protects_defaults() {
        let mut set = CategorySet::default();
        let before = set.income.clone();
        assert_eq!(
            set.remove("Salário", CategoryKind::Income),
            Err(CategoryError::DefaultProtected("Salário".into()))
        );
        assert_eq!(set.income, before);
    }

    #[test]
    fn test_remove_custom_entry() {
        let mut set = CategorySet::default();
        set.add("Pets", CategoryKind::Expense).unwrap();
        set.remove("Pets", CategoryKind::Expense).unwrap();
        assert!(!set.expense.iter().any(|c| c == "Pets"));
        assert_eq!(
            set.remove("Pets", CategoryKind::Expense),
            Err(CategoryError::NotFound("Pets".into()))
        );
    }

    #[test]
    fn test_slot_format() {
        let json = serde_json::to_value(CategorySet::default()).unwrap();
        assert!(json["expense"].is_array());
        assert!(json["income"].is_array());
    }
}
