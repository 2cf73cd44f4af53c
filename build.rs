//! 生成 C 头文件 include/photo_essay.h

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/ffi.rs");

    let crate_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => return,
    };
    let out = crate_dir.join("include").join("photo_essay.h");

    // 头文件生成失败不影响 Rust 构建
    match cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("PHOTO_ESSAY_H")
        .generate()
    {
        Ok(bindings) => {
            if let Some(parent) = out.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    println!("cargo:warning=cbindgen skipped: {}", e);
                    return;
                }
            }
            bindings.write_to_file(&out);
        }
        Err(e) => println!("cargo:warning=cbindgen skipped: {}", e),
    }
}
