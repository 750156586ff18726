/// `config_struct!` backs every section of `config.toml` (`[telegram]`,
/// `[database]`, `[solana]`, `[liquidity]`, `[pinata]`, `[wizard]`).

/// Declare a config section whose fields carry their own defaults
///
/// The section gets public fields, a `Default` impl built from the declared
/// values and `#[serde(default)]`. An operator's `config.toml` can name only
/// the keys it changes, and `--write-config` prints the rest.
///
/// # Example
/// ```
/// ziptos::config_struct! {
///     pub struct WizardConfig {
///         session_timeout_minutes: i64 = 30,
///     }
/// }
///
/// assert_eq!(WizardConfig::default().session_timeout_minutes, 30);
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
