use library::model_v1::{Author, Book, BookStatus};
use library::samples;
use library::screens::{BookEditScreen, SimpleEditScreen};
use library::settings::LibraryConfig;
use library::{info, warn, HttpTransport, LibraryError, Navigator, QueryOptions, RestApi};
use std::sync::Arc;

/// Prints the navigation a real router would perform.
struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn back(&mut self) {
        info!("navigate: back to the previous list");
    }

    fn not_found(&mut self) {
        warn!("navigate: record not found, redirecting to 404");
    }
}

/// Walks one author and one book through the create/edit lifecycle against a
/// running backend configured by library.toml / LIBRARY__API_HOST.
#[tokio::main]
async fn main() -> Result<(), LibraryError> {
    let config = LibraryConfig::new("demos/library/library")?;
    let transport = HttpTransport::new(&config.api_host)?;
    let api = Arc::new(RestApi::new(transport));
    let mut navigator = ConsoleNavigator;

    let mut author_screen = SimpleEditScreen::<Author, _>::new(Arc::clone(&api));
    author_screen.activate(&mut navigator, None).await?;
    author_screen.form.apply(|a| {
        let sample = samples::author_with_new_data();
        a.first_name = sample.first_name;
        a.last_name = sample.last_name;
    });
    let author = author_screen.save(&mut navigator).await?.into_entity();
    info!("created author {:?} {:?} with id {:?}", author.first_name, author.last_name, author.id);

    let mut book_screen = BookEditScreen::new(Arc::clone(&api));
    book_screen.activate(&mut navigator, None).await?;
    info!(
        "loaded {} category and {} author options",
        book_screen.categories.len(),
        book_screen.authors.len()
    );
    book_screen.form.apply(|b| {
        b.title = Some("taxicab nor".into());
        b.copies_owned = Some(3);
        b.status = Some(BookStatus::Available);
        b.authors = vec![author.clone()];
    });
    let book = book_screen.save(&mut navigator).await?.into_entity();
    info!("created book {:?} with id {:?}", book.title, book.id);

    book_screen.activate(&mut navigator, book.id).await?;
    book_screen.form.apply(|b| b.status = Some(BookStatus::Borrowed));
    let book = book_screen.save(&mut navigator).await?.into_entity();
    info!("book {:?} is now {:?}", book.id, book.status);

    let books = api.query::<Book>(&QueryOptions::default().sorted_by("id,desc")).await?;
    info!("backend holds {} books", books.len());

    if let Some(id) = book.id {
        api.delete::<Book>(id).await?;
        info!("deleted book {}", id);
    }
    Ok(())
}
