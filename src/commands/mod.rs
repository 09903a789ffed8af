pub mod inspect;
pub mod new;
