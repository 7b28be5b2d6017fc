//! Environment source: KEYWATCH_<SECTION>__<KEY>, e.g. KEYWATCH_SERVER__BIND.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("KEYWATCH")
            .prefix_separator("_")
            .separator("__"),
    )
}
