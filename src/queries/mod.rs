pub mod group_queries;
