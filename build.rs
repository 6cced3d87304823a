fn main() {
    // Emits ESP-IDF sysenv cargo directives when cross-building for the
    // target; a no-op on host builds where the esp-idf-sys metadata is
    // absent.
    embuild::espidf::sysenv::output();
}
