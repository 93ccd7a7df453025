//! Procedural macros for openstats


use proc_macro::TokenStream;

/// Attribute macro for test functions that exercise a storage backend.
///
/// Generates one `#[tokio::test]` wrapper per bundled backend (in-memory and
/// sharded), each constructing a fresh storage, passing it to the shared test
/// body, and ensuring cleanup via `close()`.
///
/// # Usage
///
/// ```ignore
/// #[openstats_macros::storage_test]
/// async fn my_test(storage: Arc<dyn Storage>) {
///     // test body
/// }
/// ```
///
/// # Runtime flavor
///
/// An explicit `#[tokio::test(...)]` attribute on the function is forwarded
/// to every generated wrapper:
///
/// ```ignore
/// #[openstats_macros::storage_test]
/// #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
/// async fn my_concurrent_test(storage: Arc<dyn Storage>) {
///     // test body
/// }
/// ```
#[proc_macro_attribute]
pub fn storage_test(args: TokenStream, input: TokenStream) -> TokenStream {
    test::storage::test_impl(args.into(), input.into()).into()
}
