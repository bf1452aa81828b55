pub mod blocks;

pub use blocks::{
    enum_blocks, group_by_namespace, interface_blocks, plan_blocks, registration_block,
    resolver_block, Block, EmitOptions, EnumFormatterBlock, InterfaceBlock, RegistrationBlock,
    ResolverBlock, ResolverRegistration,
};
