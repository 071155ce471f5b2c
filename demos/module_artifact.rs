//! Example: packing, saving and reloading a module artifact
//!
//! Demonstrates the artifact lifecycle: lower a trained network to a
//! `Module`, pack it into a named artifact, persist the bundle with its
//! environment manifest, and reload it from a fresh artifact.

use servir::{Artifact, ModuleArtifact, ServiceEnv};
use servir_nn::{Module, Tensor};

fn main() {
    println!("=== Module Artifact Example ===\n");

    // Lower a "trained" network to servir's module representation
    println!("Building module...");
    let net = Module::new("mlp")
        .with_parameter(
            "layer1.weight",
            Tensor::new(vec![2, 2], vec![0.1, 0.2, 0.3, 0.4]).expect("shape matches data"),
        )
        .expect("fresh parameter name")
        .with_parameter("layer1.bias", Tensor::from_vec(vec![0.01, 0.02]))
        .expect("fresh parameter name");

    println!("  Architecture: {}", net.arch());
    println!("  Parameters: {}", net.num_parameters());
    println!();

    // Pack and save
    let bundle = std::env::temp_dir().join("servir-module-artifact-demo");
    std::fs::create_dir_all(&bundle).expect("create bundle dir");

    println!("Packing and saving artifact 'net'...");
    let mut artifact = ModuleArtifact::new("net");
    artifact
        .pack(Box::new(net))
        .expect("pack module")
        .save(&bundle)
        .expect("save artifact");
    println!("  ✓ Saved to {}", bundle.join("net.pt").display());
    println!();

    // Declare runtime packages
    println!("Declaring dependencies...");
    let mut env = ServiceEnv::new();
    artifact.set_dependencies(&mut env);
    let manifest = env.write_manifest(&bundle).expect("write manifest");
    println!("  ✓ Packages: {:?}", env.packages());
    println!("  ✓ Manifest: {}", manifest.display());
    println!();

    // Reload through a fresh artifact with the same name
    println!("Reloading into a fresh artifact...");
    let mut restored = ModuleArtifact::new("net");
    restored.load(&bundle).expect("load artifact");

    let module = restored.module().expect("module present after load");
    println!("  ✓ Architecture: {}", module.arch());
    for (name, tensor) in module.parameters() {
        println!("  {} (shape={:?})", name, tensor.shape());
    }
    println!();

    // Cleanup
    println!("Cleaning up...");
    std::fs::remove_dir_all(&bundle).ok();
    println!("  ✓ Removed {}", bundle.display());
    println!();

    println!("=== Example Complete ===");
}
