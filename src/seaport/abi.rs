//! On-chain shapes of the Seaport 1.6 marketplace: the EIP-712 order
//! struct tree and the narrow slice of the contract surface this client
//! calls. Enums collapse to uint8 exactly as the protocol encodes them.

use alloy::sol;

sol! {
    struct OfferItem {
        uint8 itemType;
        address token;
        uint256 identifierOrCriteria;
        uint256 startAmount;
        uint256 endAmount;
    }

    struct ConsiderationItem {
        uint8 itemType;
        address token;
        uint256 identifierOrCriteria;
        uint256 startAmount;
        uint256 endAmount;
        address recipient;
    }

    struct OrderComponents {
        address offerer;
        address zone;
        OfferItem[] offer;
        ConsiderationItem[] consideration;
        uint8 orderType;
        uint256 startTime;
        uint256 endTime;
        bytes32 zoneHash;
        uint256 salt;
        bytes32 conduitKey;
        uint256 counter;
    }

    struct OrderParameters {
        address offerer;
        address zone;
        OfferItem[] offer;
        ConsiderationItem[] consideration;
        uint8 orderType;
        uint256 startTime;
        uint256 endTime;
        bytes32 zoneHash;
        uint256 salt;
        bytes32 conduitKey;
        uint256 totalOriginalConsiderationItems;
    }

    struct Order {
        OrderParameters parameters;
        bytes signature;
    }

    #[sol(rpc)]
    interface ISeaport {
        function fulfillOrder(Order order, bytes32 fulfillerConduitKey) external payable returns (bool fulfilled);
        function getCounter(address offerer) external view returns (uint256 counter);
    }
}
