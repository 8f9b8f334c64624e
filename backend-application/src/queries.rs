pub mod achievement_queries;
