use std::path::PathBuf;

#[path = "src/types/mod.rs"]
mod types;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/types/mod.rs");
    println!("cargo:rerun-if-changed=src/types/api_error.rs");
    println!("cargo:rerun-if-changed=src/types/endpoint.rs");
    println!("cargo:rerun-if-changed=src/types/event_type.rs");
    println!("cargo:rerun-if-changed=src/types/filter.rs");
    println!("cargo:rerun-if-changed=src/types/flow.rs");
    println!("cargo:rerun-if-changed=src/types/subscription.rs");
    println!("cargo:rerun-if-env-changed=RECONCILER_BINDINGS_DIR");

    let Some(out_dir) = std::env::var_os("RECONCILER_BINDINGS_DIR") else {
        println!("cargo:warning=RECONCILER_BINDINGS_DIR not set; skipping TypeScript bindings");
        return;
    };
    let out_dir = PathBuf::from(out_dir);

    if !out_dir.is_dir() {
        println!(
            "cargo:warning=bindings output dir not found; skipping generation: {}",
            out_dir.display()
        );
        return;
    }

    let out_file = out_dir.join("bindings.ts");
    let out_file_str = out_file.to_string_lossy().into_owned();
    let ts_cfg =
        specta::ts::ExportConfiguration::default().bigint(specta::ts::BigIntExportBehavior::Number);
    match specta::export::ts_with_cfg(&out_file_str, &ts_cfg) {
        Ok(()) => {}
        Err(specta::ts::TsExportError::Io(io_err))
            if io_err.kind() == std::io::ErrorKind::PermissionDenied =>
        {
            println!(
                "cargo:warning=bindings output not writable; skipping generation: {}",
                out_file.display()
            );
        }
        Err(err) => {
            println!(
                "cargo:warning=failed to export TypeScript bindings to {}: {err}",
                out_file.display()
            );
            std::process::exit(1);
        }
    }
}
