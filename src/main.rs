#![forbid(unsafe_code)]

use reckoner::CalculatorError;

fn main() {
    if let Err(error) = reckoner::run_from_env() {
        match &error {
            CalculatorError::Config(_) | CalculatorError::Logging(_) => {
                eprintln!("Initialization Error: {error}")
            }
            _ => eprintln!("Error: {error}"),
        }
        std::process::exit(1);
    }
}
