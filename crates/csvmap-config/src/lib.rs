/*!
# csvmap Configuration Trees

Parses descriptor documents into a queryable tree of named nodes with ordered
attributes and ordered children.

## Usage

```rust
use csvmap_config::{ConfigBuilder, ConfigResult};

fn example() -> ConfigResult<()> {
    let document = "class: fixture.Person\ncolumns:\n  - field: name\n";
    let root = ConfigBuilder::new(document.as_bytes()).build()?;

    assert_eq!(root.attribute("class"), Some("fixture.Person"));
    assert_eq!(root.children().len(), 1);
    Ok(())
}
```
*/

pub mod builder;
pub mod errors;
pub mod node;

pub use builder::{parse_str, ConfigBuilder, ROOT_NODE_NAME};
pub use errors::{ConfigError, ConfigResult};
pub use node::ConfigNode;
