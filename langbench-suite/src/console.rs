use colored::Colorize;

pub(crate) fn bold(message: &str) {
    println!("{}", message.bold());
}

pub(crate) fn warn(message: &str) {
    eprintln!("{}", message.yellow());
}

pub(crate) fn error(message: &str) {
    eprintln!("{}", message.red());
}
