use crate::global_constants::LOG_TAG_ENVIRONMENT;

/// Sets each variable that is not already present and returns the names it set.
pub fn apply_default_environment(defaults: &[(&str, &str)]) -> Vec<String> {
    let mut applied = Vec::new();

    for (name, value) in defaults {
        if std::env::var_os(name).is_some() {
            log::debug!("{} {} already set, keeping it", LOG_TAG_ENVIRONMENT, name);
            continue;
        }

        std::env::set_var(name, value);
        log::debug!("{} {}={}", LOG_TAG_ENVIRONMENT, name, value);
        applied.push(name.to_string());
    }

    applied
}
