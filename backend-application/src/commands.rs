pub mod achievement_commands;
