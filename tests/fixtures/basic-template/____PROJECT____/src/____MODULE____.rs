pub const PROJECT: &str = "____PROJECT____";

pub fn module_name() -> &'static str {
    "____MODULE____"
}
