//! Build script - forwards ESP-IDF linker and include configuration
//! emitted by esp-idf-sys. A no-op when only the host-test library is
//! built (no `embedded` feature, no ESP-IDF environment).

fn main() {
    println!("cargo:rerun-if-changed=sdkconfig.defaults");
    embuild::espidf::sysenv::output();
}
