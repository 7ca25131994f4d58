pub mod passive_plugin;
