pub const TITLE_TEXT: &str = r#"
 ___ _                         ___ _        _
| __| |__ _ _ __ _ __ _  _    | _ |_)_ _ __| |
| _|| / _` | '_ \ '_ \ || |   | _ \ | '_/ _` |
|_| |_\__,_| .__/ .__/\_, |   |___/_|_| \__,_|
           |_|  |_|   |__/
"#;

pub const VERSION_TITLE: &str = "Version";
pub const HELP_TITLE: &str = "Help";
pub const HELP_TEXT: &str = "Press space or click the field to flap. Avoid the pipes.";
