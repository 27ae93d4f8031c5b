fn main() -> std::process::ExitCode {
    laravel_encrypt::run()
}
