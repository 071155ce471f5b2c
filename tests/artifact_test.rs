//! Integration tests for the artifact bundle lifecycle

#![cfg(feature = "nn")]

use servir::{Artifact, ArtifactSet, ModuleArtifact, PickleArtifact, ServiceEnv};
use servir_nn::{Module, Tensor};

fn trained_net() -> Module {
    Module::new("mlp")
        .with_parameter(
            "layer1.weight",
            Tensor::new(vec![2, 3], vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).unwrap(),
        )
        .unwrap()
        .with_parameter("layer1.bias", Tensor::from_vec(vec![0.01, 0.02, 0.03]))
        .unwrap()
}

#[test]
fn test_full_bundle_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = dir.path().join("bundle");

    // Build the service's artifacts
    let mut artifacts = ArtifactSet::new();
    artifacts.add(Box::new(ModuleArtifact::new("net"))).unwrap();
    artifacts
        .add(Box::new(PickleArtifact::<Vec<String>>::new("labels", "labels")))
        .unwrap();

    artifacts
        .get_mut("net")
        .unwrap()
        .pack(Box::new(trained_net()))
        .unwrap();
    artifacts
        .get_mut("labels")
        .unwrap()
        .pack(Box::new(vec!["yes".to_string(), "no".to_string()]))
        .unwrap();

    // Persist artifacts plus the environment manifest
    artifacts.save_all(&bundle).unwrap();

    let mut env = ServiceEnv::new();
    artifacts.set_dependencies(&mut env);
    env.write_manifest(&bundle).unwrap();

    assert!(bundle.join("net.pt").exists());
    assert!(bundle.join("labels.pkl").exists());
    assert!(bundle.join("servir-env.json").exists());
    assert_eq!(env.packages(), ["servir-nn"]);

    // A fresh set reloads the same state
    let mut restored = ArtifactSet::new();
    restored.add(Box::new(ModuleArtifact::new("net"))).unwrap();
    restored
        .add(Box::new(PickleArtifact::<Vec<String>>::new("labels", "labels")))
        .unwrap();
    restored.load_all(&bundle).unwrap();

    let net = restored
        .get("net")
        .unwrap()
        .get()
        .unwrap()
        .downcast_ref::<Module>()
        .unwrap();
    assert_eq!(net.arch(), "mlp");
    assert_eq!(net.num_parameters(), 9);
    assert_eq!(
        net.parameter("layer1.bias").unwrap().values(),
        &[0.01, 0.02, 0.03]
    );

    let loaded_labels = restored
        .get("labels")
        .unwrap()
        .get()
        .unwrap()
        .downcast_ref::<Vec<String>>()
        .unwrap();
    assert_eq!(loaded_labels, &["yes", "no"]);
}

#[test]
fn test_same_name_fresh_artifact_reloads() {
    let dir = tempfile::tempdir().unwrap();

    let mut original = ModuleArtifact::new("net");
    original
        .pack(Box::new(trained_net()))
        .unwrap()
        .save(dir.path())
        .unwrap();

    let mut fresh = ModuleArtifact::new("net");
    fresh.load(dir.path()).unwrap();

    let module = fresh.module().unwrap();
    assert_eq!(module.arch(), "mlp");
    assert_eq!(
        module.parameter("layer1.weight").unwrap().shape(),
        &[2, 3]
    );
}

#[test]
fn test_dependency_declaration_is_idempotent_across_artifacts() {
    let mut artifacts = ArtifactSet::new();
    artifacts.add(Box::new(ModuleArtifact::new("encoder"))).unwrap();
    artifacts.add(Box::new(ModuleArtifact::new("decoder"))).unwrap();

    let mut env = ServiceEnv::new();
    artifacts.set_dependencies(&mut env);
    artifacts.set_dependencies(&mut env);

    assert_eq!(env.packages(), ["servir-nn"]);
}
