use std::process::ExitCode;

fn main() -> ExitCode {
    reinbox_cleaner_lib::run()
}
