//! GraphQL documents for every remote operation. The documents are opaque
//! strings as far as this crate is concerned; the server owns the schema.

pub const REGISTER: &str = r#"
  mutation Register($input: RegisterInput!) {
    register(input: $input) {
      token
      user {
        id
        email
        role
        createdAt
      }
    }
  }
"#;

pub const LOGIN: &str = r#"
  mutation Login($input: LoginInput!) {
    login(input: $input) {
      token
      user {
        id
        email
        role
        createdAt
      }
    }
  }
"#;

pub const ME: &str = r#"
  query Me {
    me {
      id
      email
      role
      createdAt
    }
  }
"#;

pub const ASSETS: &str = r#"
  query Assets {
    assets {
      id
      name
      target
      assetType
      createdAt
      lastScannedAt
      scans {
        id
        status
        startedAt
        completedAt
      }
    }
  }
"#;

pub const ASSET: &str = r#"
  query Asset($id: ID!) {
    asset(id: $id) {
      id
      name
      target
      assetType
      createdAt
      lastScannedAt
      scans {
        id
        status
        startedAt
        completedAt
        errorMessage
        results {
          id
          port
          protocol
          state
          service
          version
          banner
        }
      }
    }
  }
"#;

pub const CREATE_ASSET: &str = r#"
  mutation CreateAsset($input: CreateAssetInput!) {
    createAsset(input: $input) {
      id
      name
      target
      assetType
      createdAt
      lastScannedAt
    }
  }
"#;

pub const DELETE_ASSET: &str = r#"
  mutation DeleteAsset($id: ID!) {
    deleteAsset(id: $id)
  }
"#;

pub const SCANS: &str = r#"
  query Scans($assetId: ID) {
    scans(assetId: $assetId) {
      id
      status
      startedAt
      completedAt
      errorMessage
      asset {
        id
        name
        target
      }
      results {
        id
        port
        protocol
        state
        service
        version
        banner
      }
    }
  }
"#;

pub const SCAN: &str = r#"
  query Scan($id: ID!) {
    scan(id: $id) {
      id
      status
      startedAt
      completedAt
      errorMessage
      asset {
        id
        name
        target
        assetType
      }
      results {
        id
        port
        protocol
        state
        service
        version
        banner
      }
    }
  }
"#;

pub const START_SCAN: &str = r#"
  mutation StartScan($assetId: ID!) {
    startScan(assetId: $assetId) {
      id
      status
      startedAt
      asset {
        id
        name
        target
      }
    }
  }
"#;

pub const EXPORT_SCANS: &str = r#"
  mutation ExportScans($assetId: ID) {
    exportScans(assetId: $assetId)
  }
"#;
