//! Generates a small demo Swift package into `./demo-out`.
//!
//! Run with:
//! ```sh
//! RUST_LOG=debug cargo run --example generate
//! ```

use matterswift_codegen::{FileStorage, GeneratorOptions, generate};
use matterswift_idl::{Attribute, AttributeQuality, Cluster, Command, DataType, Field, Idl};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut idl = Idl::new();

    let mut on_off = Cluster::new("OnOff", 0x0006)
        .with_description("Attributes and commands for switching devices\nbetween on and off states.");
    on_off.add_attribute(Attribute::new(
        Field::new("onOff", 0, DataType::new("boolean")),
        vec![AttributeQuality::Readable],
    ));
    on_off.add_command(Command::new("Toggle", 2, "DefaultSuccess"));
    idl.add_cluster(on_off);

    let options = GeneratorOptions::new("demo-out").with_views();
    let mut storage = FileStorage::new();
    generate(idl, options, &mut storage)?;

    println!("generated Swift package under ./demo-out");
    Ok(())
}
