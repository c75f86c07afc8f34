//! VPC with two public subnets, an internet gateway, and a default route.
//!
//! ```text
//! VPC ◄──────────┬──────────────┬───────────────┐
//!  ▲             │              │               │
//!  │   InternetGatewayAttachment  Subnet1/Subnet2  RouteTable ◄── DefaultRoute
//!  │             │                   ▲              ▲   ▲            │
//! InternetGateway┘                   │              │   │            │
//!       ▲                  Subnet{1,2}RouteTableAssociation          │
//!       └────────────────────────────────────────────────────────────┘
//! ```

use stackform_core::domain::{
    DomainError, Output, Parameter, ParameterType, Resource, ResourceKind, Template, Value,
};

pub const DESCRIPTION: &str = "Create VPC resources for Blue/Green Deployment on ECS. For further reference, please review BluegreenRepo ==> https://github.com/awslabs/ecs-blue-green-deployment";

/// Default artifact file name.
pub const OUTPUT_FILE: &str = "vpc_new.yaml";

/// Destination of the default route.
pub const ANY_IPV4: &str = "0.0.0.0/0";

/// Declare the public VPC stack.
///
/// Parameters `Name`, `VpcCIDR`, `Subnet1CIDR`, `Subnet2CIDR`; nine
/// resources; outputs `Subnet1`, `Subnet2`, `VPC`.
pub fn public_vpc() -> Result<Template, DomainError> {
    let mut t = Template::new();
    t.set_description(DESCRIPTION);

    let name = string_parameter(&mut t, "Name")?;
    let vpc_cidr = string_parameter(&mut t, "VpcCIDR")?;
    let subnet1_cidr = string_parameter(&mut t, "Subnet1CIDR")?;
    let subnet2_cidr = string_parameter(&mut t, "Subnet2CIDR")?;

    let name_tag = Value::tags([("Name", name)]);

    let vpc = t
        .declare_resource(
            Resource::new("VPC", ResourceKind::Vpc)
                .property("CidrBlock", vpc_cidr)
                .property("Tags", name_tag.clone()),
        )?
        .reference();

    let gateway = t
        .declare_resource(
            Resource::new("InternetGateway", ResourceKind::InternetGateway)
                .property("Tags", name_tag.clone()),
        )?
        .reference();

    t.declare_resource(
        Resource::new("InternetGatewayAttachment", ResourceKind::VpcGatewayAttachment)
            .property("InternetGatewayId", gateway.clone())
            .property("VpcId", vpc.clone()),
    )?;

    let subnet1 = public_subnet(&mut t, "Subnet1", &vpc, subnet1_cidr, 0)?;
    let subnet2 = public_subnet(&mut t, "Subnet2", &vpc, subnet2_cidr, 1)?;

    let route_table = t
        .declare_resource(
            Resource::new("RouteTable", ResourceKind::RouteTable)
                .property("VpcId", vpc.clone())
                .property("Tags", name_tag),
        )?
        .reference();

    t.declare_resource(
        Resource::new("DefaultRoute", ResourceKind::Route)
            .property("RouteTableId", route_table.clone())
            .property("DestinationCidrBlock", ANY_IPV4)
            .property("GatewayId", gateway),
    )?;

    associate(&mut t, "Subnet1RouteTableAssociation", &route_table, &subnet1)?;
    associate(&mut t, "Subnet2RouteTableAssociation", &route_table, &subnet2)?;

    t.declare_output(Output::new("Subnet1", subnet1))?;
    t.declare_output(Output::new("Subnet2", subnet2))?;
    t.declare_output(Output::new("VPC", vpc))?;

    Ok(t)
}

fn string_parameter(t: &mut Template, name: &str) -> Result<Value, DomainError> {
    Ok(t
        .declare_parameter(Parameter::new(name, ParameterType::String))?
        .reference())
}

/// Subnet pinned to the `zone`-th availability zone of the stack's region.
fn public_subnet(
    t: &mut Template,
    logical_id: &str,
    vpc: &Value,
    cidr: Value,
    zone: usize,
) -> Result<Value, DomainError> {
    Ok(t
        .declare_resource(
            Resource::new(logical_id, ResourceKind::Subnet)
                .property("VpcId", vpc.clone())
                .property("CidrBlock", cidr)
                .property("AvailabilityZone", Value::select(zone, Value::get_azs("")))
                .property("Tags", Value::tags([("Name", Value::sub("${Name}-Public"))])),
        )?
        .reference())
}

fn associate(
    t: &mut Template,
    logical_id: &str,
    route_table: &Value,
    subnet: &Value,
) -> Result<(), DomainError> {
    t.declare_resource(
        Resource::new(logical_id, ResourceKind::SubnetRouteTableAssociation)
            .property("RouteTableId", route_table.clone())
            .property("SubnetId", subnet.clone()),
    )?;
    Ok(())
}
