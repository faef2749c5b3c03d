//! End-to-end tests for a permit token deployed on a live node.
//!
//! The tests live under `tests/` and only build with the `e2e` feature:
//!
//! ```bash
//! RPC_URL=http://localhost:8545 \
//! PERMIT_TOKEN_ADDRESS=0x... \
//! RELAYER_PRIVATE_KEY=0x... \
//! cargo test -p e2e-tests --features e2e
//! ```
