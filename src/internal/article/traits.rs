pub mod article_fetcher;

pub use article_fetcher::ArticleFetcher;
