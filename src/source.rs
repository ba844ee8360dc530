//! The sample document every run highlights

/// TSX snippet exercising imports, declarations of every kind, type
/// annotations and JSX
pub const SOURCE_DOCUMENT: &str = r#"import { View } from 'react-native';

const ExampleScreen: React.FC = () => {
  let count = 0;
  var legacy = "old";

  return <View />;
};

export default ExampleScreen;"#;
