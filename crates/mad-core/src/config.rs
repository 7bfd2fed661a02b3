use serde::{Deserialize, Serialize};

/// Limits and switches applied to every engine instance a host creates.
///
/// Size limits use `0` for "unlimited".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScriptConfig {
    /// Reject scripts that reference undeclared variables at compile time.
    pub strict_variables: bool,
    pub max_call_levels: usize,
    pub max_expr_depth: usize,
    pub max_function_expr_depth: usize,
    pub max_string_size: usize,
    pub max_array_size: usize,
    pub max_map_size: usize,
    /// Highest argument count a registered native trampoline accepts.
    pub max_callback_arity: usize,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            strict_variables: false,
            max_call_levels: 64,
            max_expr_depth: 64,
            max_function_expr_depth: 32,
            max_string_size: 0,
            max_array_size: 0,
            max_map_size: 0,
            max_callback_arity: 8,
        }
    }
}
