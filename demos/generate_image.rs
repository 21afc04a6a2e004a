use xioca_rs::types::ImageModel;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = xioca_rs::client()?;

    let image = client
        .images()
        .generate(ImageModel::Flux, "a watercolor fox in the snow")
        .await?;

    println!("{}", image.url);

    Ok(())
}
