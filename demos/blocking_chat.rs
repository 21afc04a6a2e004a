use xioca_rs::blocking;
use xioca_rs::types::{ChatMessage, TextModel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = blocking::Client::from_env()?;

    let mut request = client.chat().create(
        TextModel::Llama33,
        vec![ChatMessage::user("Tell me a joke about threads.")],
    );
    request.online(true);

    let completion = request.send()?;
    println!("{completion}");

    Ok(())
}
