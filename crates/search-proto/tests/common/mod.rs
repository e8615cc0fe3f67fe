pub mod mock_search;
