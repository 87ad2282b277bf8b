#[actix_web::main]
async fn main() -> vocanalyzer_lib::Result<()> {
    vocanalyzer_lib::run().await
}
