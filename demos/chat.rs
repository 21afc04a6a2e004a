use xioca_rs::types::{ChatMessage, TextModel};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = xioca_rs::client()?;

    let mut request = client.chat().create(
        TextModel::DeepseekV3,
        vec![
            ChatMessage::system("You answer in one sentence."),
            ChatMessage::user("What is the borrow checker?"),
        ],
    );
    request.temperature(0.7);

    let completion = request.await?;
    println!("{completion}");

    if let Some(usage) = completion.usage {
        println!("({} tokens)", usage.total_tokens);
    }

    Ok(())
}
