pub mod group_ops;
