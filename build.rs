use shadow_rs::ShadowBuilder;

fn main() {
    // Exposes PKG_VERSION and CLAP_LONG_VERSION to `feed_cache::build`
    ShadowBuilder::builder()
        .build()
        .expect("Failed to generate shadow-rs build metadata");
}
