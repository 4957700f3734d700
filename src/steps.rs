use std::fmt;

use lazy_static::lazy_static;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Step {
    None,
    Exceptions,
    Files,
    Dictionaries,
    Tuples,
    Slicing,
    Comprehensions,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::None => write!(f, "none"),
            Step::Exceptions => write!(f, "exceptions"),
            Step::Files => write!(f, "files"),
            Step::Dictionaries => write!(f, "dictionaries"),
            Step::Tuples => write!(f, "tuples"),
            Step::Slicing => write!(f, "slicing"),
            Step::Comprehensions => write!(f, "comprehensions"),
        }
    }
}

lazy_static! {
    /// Every step, in the order the runner executes them
    pub static ref STEPS: Vec<Step> = vec![
        Step::None,
        Step::Exceptions,
        Step::Files,
        Step::Dictionaries,
        Step::Tuples,
        Step::Slicing,
        Step::Comprehensions,
    ];
}

#[test]
fn test_order() {
    assert_eq!(STEPS.len(), 7);
    assert_eq!(STEPS[0], Step::None);
    assert_eq!(STEPS[2], Step::Files);
    assert_eq!(STEPS[6], Step::Comprehensions);
    assert_eq!(STEPS[3].to_string(), "dictionaries");
}
