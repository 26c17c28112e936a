mod delete;

use authentcare_test_utils::prelude::*;
use entity::version::VersionKind;

use super::*;
