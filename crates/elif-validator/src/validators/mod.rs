//! Built-in validators for common validation scenarios

pub mod comparison;
pub mod custom;
pub mod email;
pub mod membership;
pub mod password;
pub mod pattern;
pub mod required;
pub mod size;
pub mod types;

pub use comparison::{ConfirmedValidator, DifferentValidator, SameValidator};
pub use custom::{ClosureFn, ClosureRule};
pub use email::EmailValidator;
pub use membership::{In, NotIn};
pub use password::{Password, PasswordRequirement};
pub use pattern::PatternValidator;
pub use required::{
    FilledValidator, PresentValidator, RequiredIfValidator, RequiredValidator, RequiredWithValidator,
};
pub use size::{Bound, SizeValidator};
pub use types::TypeValidator;
