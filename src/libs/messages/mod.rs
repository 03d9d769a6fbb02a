pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;

pub fn wrap_msg(msg: Message) -> String {
    format!("\n{}\n", msg)
}
