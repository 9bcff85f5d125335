//! Native constraint validation for input elements.

use std::fmt;

use regex::Regex;

/// Input element type. Only types with their own validity rules are distinguished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputType {
    #[default]
    Text,
    Email,
    Password,
    Tel,
    Search,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Tel => "tel",
            Self::Search => "search",
        }
    }
}

/// Validation constraints declared on an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    pub required: bool,
    pub input_type: InputType,
    /// Pattern the whole value must match (implicitly anchored).
    pub pattern: Option<String>,
    /// Checked on any non-empty value, not only after user edits.
    pub min_length: Option<usize>,
    /// Checked on any non-empty value, not only after user edits.
    pub max_length: Option<usize>,
    /// Custom validity message. A non-empty message makes the element invalid.
    pub custom_error: Option<String>,
}

/// Named validity failure flags.
///
/// `ValidityFlag::ALL` lists them in the fixed priority order used to pick
/// a single error message when several flags are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValidityFlag {
    ValueMissing,
    TypeMismatch,
    PatternMismatch,
    TooLong,
    TooShort,
    CustomError,
}

impl ValidityFlag {
    pub const ALL: [ValidityFlag; 6] = [
        ValidityFlag::ValueMissing,
        ValidityFlag::TypeMismatch,
        ValidityFlag::PatternMismatch,
        ValidityFlag::TooLong,
        ValidityFlag::TooShort,
        ValidityFlag::CustomError,
    ];

    /// The flag's platform name (`valueMissing`, `patternMismatch`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValueMissing => "valueMissing",
            Self::TypeMismatch => "typeMismatch",
            Self::PatternMismatch => "patternMismatch",
            Self::TooLong => "tooLong",
            Self::TooShort => "tooShort",
            Self::CustomError => "customError",
        }
    }

    /// Look up a flag by its platform name. `valid` is not a failure flag.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for ValidityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of an element's validity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityState {
    pub value_missing: bool,
    pub type_mismatch: bool,
    pub pattern_mismatch: bool,
    pub too_long: bool,
    pub too_short: bool,
    pub custom_error: bool,
}

impl ValidityState {
    /// Evaluate constraints against a value.
    ///
    /// Disabled elements are barred from validation and always valid.
    /// An empty value can only fail `required`.
    pub fn evaluate(value: &str, disabled: bool, constraints: &Constraints) -> Self {
        let mut state = Self::default();
        if disabled {
            return state;
        }

        state.custom_error = constraints
            .custom_error
            .as_deref()
            .is_some_and(|msg| !msg.is_empty());

        if value.is_empty() {
            state.value_missing = constraints.required;
            return state;
        }

        if constraints.input_type == InputType::Email {
            state.type_mismatch = !email_address::EmailAddress::is_valid(value);
        }

        if let Some(pattern) = &constraints.pattern {
            match Regex::new(&format!("^(?:{pattern})$")) {
                Ok(re) => state.pattern_mismatch = !re.is_match(value),
                // An unparseable pattern is ignored, as browsers do
                Err(e) => log::warn!("[validity] ignoring invalid pattern {pattern:?}: {e}"),
            }
        }

        let len = value.chars().count();
        state.too_long = constraints.max_length.is_some_and(|max| len > max);
        state.too_short = constraints.min_length.is_some_and(|min| len < min);

        state
    }

    /// The catch-all flag: true when no failure flag is set.
    pub fn valid(&self) -> bool {
        Self::flags(self).all(|(_, set)| !set)
    }

    pub fn get(&self, flag: ValidityFlag) -> bool {
        match flag {
            ValidityFlag::ValueMissing => self.value_missing,
            ValidityFlag::TypeMismatch => self.type_mismatch,
            ValidityFlag::PatternMismatch => self.pattern_mismatch,
            ValidityFlag::TooLong => self.too_long,
            ValidityFlag::TooShort => self.too_short,
            ValidityFlag::CustomError => self.custom_error,
        }
    }

    /// All failure flags with their current value, in priority order.
    pub fn flags(&self) -> impl Iterator<Item = (ValidityFlag, bool)> + '_ {
        ValidityFlag::ALL.into_iter().map(|f| (f, self.get(f)))
    }
}
